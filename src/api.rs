//! PokeAPI client

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://pokeapi.co/api/v2";

/// Enrichment data from the detail endpoint, keyed by the record id
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonDetailData {
    pub id: u16,
    pub abilities: Vec<String>,
    pub types: Vec<String>,
    pub height: u16,
    pub weight: u16,
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    height: u16,
    weight: u16,
    types: Vec<PokemonTypeSlot>,
    abilities: Vec<PokemonAbilitySlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

/// Fetch the catalog names. The caller assigns ids and sprite URLs from the
/// position in this sequence; the source supplies names only.
pub async fn fetch_pokemon_list(limit: u32) -> Result<Vec<String>, String> {
    let url = format!("{API_BASE}/pokemon?limit={limit}");
    let response = reqwest::get(&url).await.map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    let data: ListResponse = response.json().await.map_err(|err| err.to_string())?;
    Ok(data.results.into_iter().map(|entry| entry.name).collect())
}

/// Fetch ability/type/height/weight enrichment for one record.
pub async fn fetch_pokemon_detail(id: u16) -> Result<PokemonDetailData, String> {
    let url = format!("{API_BASE}/pokemon/{id}");
    let response = reqwest::get(&url).await.map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    let data: PokemonResponse = response.json().await.map_err(|err| err.to_string())?;

    Ok(PokemonDetailData {
        id: data.id,
        abilities: data
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        types: data.types.into_iter().map(|slot| slot.type_info.name).collect(),
        height: data.height,
        weight: data.weight,
    })
}

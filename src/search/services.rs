use crate::catalog::repo;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::dto::SearchHit;
use super::fuzzy::is_fuzzy_match;
use super::text::normalize;

/// Search both catalogs for an approximate name match and return one
/// ranked list, foods before recipes on ties.
pub async fn combined_search(state: &AppState, raw_query: &str) -> ApiResult<Vec<SearchHit>> {
    let trimmed = raw_query.trim();
    if trimmed.chars().count() < 2 {
        return Err(ApiError::UnprocessableQuery(
            "Query must be at least 2 characters long".into(),
        ));
    }

    let query = normalize(trimmed);
    let limit = state.config.search.scan_limit;
    let max_distance = state.config.search.fuzzy_max_distance;

    // The two scans are independent, so issue them together and join.
    let (foods, recipes) = tokio::join!(
        repo::scan_foods(&state.db, limit),
        repo::scan_recipes(&state.db, limit),
    );
    let (foods, recipes) = (foods?, recipes?);

    let mut hits: Vec<SearchHit> = foods
        .iter()
        .filter(|f| matches_query(&query, &f.description, max_distance))
        .map(SearchHit::from_food)
        .collect();
    hits.extend(
        recipes
            .iter()
            .filter(|r| matches_query(&query, &r.name, max_distance))
            .map(SearchHit::from_recipe),
    );

    if hits.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No food or recipe found for '{trimmed}'"
        )));
    }

    rank_hits(&mut hits, &query);
    Ok(hits)
}

/// Substring containment is the cheap primary path; the bounded-prefix
/// fuzzy comparison only backs it up for typos.
fn matches_query(normalized_query: &str, raw_name: &str, max_distance: usize) -> bool {
    let name = normalize(raw_name);
    name.contains(normalized_query) || is_fuzzy_match(normalized_query, &name, max_distance)
}

/// Stable sort on a single boolean key: prefix matches first, everything
/// else keeps its scan order. Membership is decided before ranking, so a
/// hit can never be lost here.
fn rank_hits(hits: &mut [SearchHit], normalized_query: &str) {
    hits.sort_by_key(|hit| !normalize(&hit.description).starts_with(normalized_query));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::dto::HitSource;

    fn hit(id: &str, description: &str, source: HitSource) -> SearchHit {
        SearchHit {
            id: id.into(),
            description: description.into(),
            source,
            calorias_kcal: 0.0,
            proteinas_g: 0.0,
            carbo_g: 0.0,
            gordura_g: 0.0,
        }
    }

    #[test]
    fn test_matches_by_substring_anywhere() {
        assert!(matches_query("doce", "Batata doce cozida", 2));
        assert!(matches_query("batata", "Batata frita", 2));
        assert!(!matches_query("quinoa", "Batata frita", 2));
    }

    #[test]
    fn test_matches_typo_through_fuzzy_fallback() {
        assert!(matches_query("btata", "Batata doce", 2));
        assert!(matches_query("arros", "Arroz", 2));
    }

    #[test]
    fn test_rank_prefix_matches_first() {
        let mut hits = vec![
            hit("1", "Pure de batata", HitSource::Taco),
            hit("2", "Batata inglesa", HitSource::Taco),
            hit("3", "Batata palha", HitSource::Recipe),
        ];
        rank_hits(&mut hits, "batata");

        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["2", "3", "1"]);
    }

    #[test]
    fn test_rank_is_stable_within_key() {
        // None of these starts with the query, so scan order survives:
        // catalog hits stay ahead of recipe hits.
        let mut hits = vec![
            hit("1", "Pure de batata", HitSource::Taco),
            hit("2", "Salada com batata", HitSource::Taco),
            hit("3", "Bolinho de batata", HitSource::Recipe),
        ];
        rank_hits(&mut hits, "batata");

        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_rank_normalizes_before_comparing() {
        let mut hits = vec![
            hit("1", "Feijoada completa", HitSource::Recipe),
            hit("2", "Feijão carioca", HitSource::Taco),
        ];
        rank_hits(&mut hits, "feijao");

        assert_eq!(hits[0].id, "2");
    }
}

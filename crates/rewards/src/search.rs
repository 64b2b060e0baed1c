//! Default scorer for search responses.

use vigil_api::{RewardFn, ScoringError};
use vigil_primitives::SearchResponse;

/// Weight for a non-empty image.
const IMAGE_REWARD: f64 = 0.5;
/// Weight for a non-empty title together with preview text.
const TEXT_REWARD: f64 = 0.3;
/// Weight for a non-empty host url.
const URL_REWARD: f64 = 0.2;

/// Rewards search results by completeness, in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResultScorer;

impl RewardFn<SearchResponse> for SearchResultScorer {
    fn score(&self, response: Option<&SearchResponse>) -> Result<f64, ScoringError> {
        let Some(result) = response.and_then(|response| response.result.as_ref()) else {
            return Ok(0.0);
        };

        let mut reward = 0.0;
        if !result.image_base64.is_empty() {
            reward += IMAGE_REWARD;
        }
        if !result.title.is_empty() && !result.preview_text.is_empty() {
            reward += TEXT_REWARD;
        }
        if !result.host_url.is_empty() {
            reward += URL_REWARD;
        }
        Ok(reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vigil_primitives::SearchResult;

    fn result(title: &str, preview: &str, image: &str, url: &str) -> SearchResponse {
        SearchResponse::found(SearchResult {
            title: title.into(),
            preview_text: preview.into(),
            image_base64: image.into(),
            host_url: url.into(),
        })
    }

    #[test]
    fn test_complete_result() {
        let response = result("Kestrel", "A small falcon", "aGVsbG8=", "https://birds.example");
        let reward = SearchResultScorer.score(Some(&response)).unwrap();
        assert!((reward - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_results() {
        let image_only = result("", "", "aGVsbG8=", "");
        assert_eq!(SearchResultScorer.score(Some(&image_only)), Ok(0.5));

        // title without preview earns nothing for text
        let title_and_url = result("Kestrel", "", "", "https://birds.example");
        assert_eq!(SearchResultScorer.score(Some(&title_and_url)), Ok(0.2));
    }

    #[test]
    fn test_missing_result() {
        assert_eq!(SearchResultScorer.score(None), Ok(0.0));
        assert_eq!(SearchResultScorer.score(Some(&SearchResponse::empty())), Ok(0.0));
    }

    proptest! {
        #[test]
        fn test_reward_stays_in_unit_interval(
            title in ".{0,8}",
            preview in ".{0,8}",
            image in ".{0,8}",
            url in ".{0,8}",
        ) {
            let response = result(&title, &preview, &image, &url);
            let reward = SearchResultScorer.score(Some(&response)).unwrap();
            prop_assert!((0.0..=1.0 + 1e-12).contains(&reward));

            let mut expected = 0.0;
            if !image.is_empty() {
                expected += 0.5;
            }
            if !title.is_empty() && !preview.is_empty() {
                expected += 0.3;
            }
            if !url.is_empty() {
                expected += 0.2;
            }
            prop_assert!((reward - expected).abs() < 1e-12);
        }
    }
}

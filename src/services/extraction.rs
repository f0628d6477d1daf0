//! Id extraction from the current result page

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{CrawlError, CrawlResult};
use crate::infrastructure::PageDriver;
use crate::models::{EntityId, KindProfile};

/// Takes the id out of a detail link such as `.../Biografia.aspx?BID=3`
///
/// The id is the text between the first `=` and the next one (or the end).
pub fn token_from_href(href: &str) -> CrawlResult<String> {
    match href.split('=').nth(1) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(CrawlError::MalformedLink {
            href: href.to_string(),
        }),
    }
}

/// Zips id tokens with session numbers rendered in the same order
pub fn pair_ids(tokens: Vec<String>, numbers: Vec<String>) -> HashSet<EntityId> {
    if tokens.len() != numbers.len() {
        warn!(
            "⚠️ {} id links but {} session numbers on this page, pairing the first {}",
            tokens.len(),
            numbers.len(),
            tokens.len().min(numbers.len())
        );
    }
    tokens
        .into_iter()
        .zip(numbers)
        .map(|(token, number)| EntityId::with_number(token, number))
        .collect()
}

/// Collects the ids listed on the page currently shown
pub async fn extract_ids<D: PageDriver + ?Sized>(
    driver: &D,
    profile: &KindProfile,
) -> CrawlResult<HashSet<EntityId>> {
    let links = driver.find_all(&profile.id_links()).await?;
    let tokens = links
        .iter()
        .map(|link| {
            link.attribute("href")
                .ok_or(CrawlError::MissingAttribute { attribute: "href" })
                .and_then(token_from_href)
        })
        .collect::<CrawlResult<Vec<String>>>()?;

    let ids = match profile.number_links() {
        Some(number_locator) => {
            let numbers = driver
                .find_all(&number_locator)
                .await?
                .iter()
                .map(|link| link.text().to_string())
                .collect();
            pair_ids(tokens, numbers)
        }
        None => tokens.into_iter().map(EntityId::new).collect(),
    };

    debug!("extracted {} ids", ids.len());
    Ok(ids)
}

use crate::models::{Member, MembersDocument};
use crate::records::normalize_members;
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

/// Reads the member document once. Any failure leaves the club empty rather than
/// stopping the server.
pub async fn load_members(path: &Path) -> Vec<Member> {
    match fs::read(path).await {
        Ok(bytes) => parse_members(&bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "member data file not found");
            Vec::new()
        }
        Err(err) => {
            error!("failed to read member data file: {err}");
            Vec::new()
        }
    }
}

/// Parses the document, skipping any member entry that does not deserialize.
pub fn parse_members(bytes: &[u8]) -> Vec<Member> {
    let document = match serde_json::from_slice::<MembersDocument>(bytes) {
        Ok(document) => document,
        Err(err) => {
            error!("failed to parse member data file: {err}");
            return Vec::new();
        }
    };

    let members = document
        .members
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value::<Member>(raw) {
            Ok(member) => Some(member),
            Err(err) => {
                warn!(index, error = %err, "skipping unreadable member entry");
                None
            }
        })
        .collect();
    normalize_members(members)
}

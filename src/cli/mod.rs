pub mod add;
pub mod checkin;
pub mod list;
pub mod show;
pub mod stats;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

use crate::advisor::PhotoPayload;
use crate::garden::tracker::Garden;
use crate::garden::types::Plant;

/// Find a plant by id or by name.
///
/// Ids always win. Name matching ignores case; a name shared by several
/// plants is ambiguous and must be narrowed down to an id.
pub fn resolve_plant(garden: &Garden, selector: &str) -> Result<Plant> {
    if let Some(plant) = garden.find_plant(selector) {
        return Ok(plant);
    }

    let mut matches: Vec<Plant> = garden
        .plants()
        .into_iter()
        .filter(|p| p.name.eq_ignore_ascii_case(selector))
        .collect();
    if matches.len() > 1 {
        anyhow::bail!(
            "{} plants are named '{selector}', pick one by id instead",
            matches.len()
        );
    }
    match matches.pop() {
        Some(plant) => Ok(plant),
        None => anyhow::bail!("no plant found matching '{selector}'"),
    }
}

/// Read an image file into a base64 payload for the vision model.
///
/// The MIME type comes from the file extension; anything unrecognized is
/// treated as JPEG.
pub fn load_photo(path: &Path) -> Result<PhotoPayload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read photo: {}", path.display()))?;
    anyhow::ensure!(!bytes.is_empty(), "photo file is empty: {}", path.display());

    Ok(PhotoPayload {
        base64: STANDARD.encode(&bytes),
        mime_type: mime_type_for(path).to_string(),
    })
}

fn mime_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        Some(ext) if ext.eq_ignore_ascii_case("webp") => "image/webp",
        Some(ext) if ext.eq_ignore_ascii_case("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// Spinner shown while waiting on the advice API.
fn advice_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_photo_encodes_file_contents() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"not really a png").unwrap();

        let payload = load_photo(file.path()).unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.base64, STANDARD.encode(b"not really a png"));
    }

    #[test]
    fn test_load_photo_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_photo(file.path()).unwrap_err();
        assert!(err.to_string().contains("photo file is empty"));
    }

    #[test]
    fn test_load_photo_missing_file_errors() {
        let err = load_photo(Path::new("/no/such/photo.jpg")).unwrap_err();
        assert!(err.to_string().contains("failed to read photo"));
    }

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(mime_type_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("photo")), "image/jpeg");
    }

    #[test]
    fn test_resolve_plant_by_id_name_and_failure_modes() {
        let dir = tempfile::TempDir::new().unwrap();
        let garden = Garden::open(dir.path()).unwrap();
        let now = "2026-03-01T00:00:00Z".parse().unwrap();
        let fern = garden.add_plant("Fernie", "YQ==", None, "hi", now).unwrap();
        garden.add_plant("Twin", "Yg==", None, "hi", now).unwrap();
        garden.add_plant("Twin", "Yw==", None, "hi", now).unwrap();

        assert_eq!(resolve_plant(&garden, &fern.id).unwrap().name, "Fernie");
        assert_eq!(resolve_plant(&garden, "Fernie").unwrap().id, fern.id);
        assert_eq!(resolve_plant(&garden, "fernie").unwrap().id, fern.id);

        let err = resolve_plant(&garden, "Twin").unwrap_err();
        assert!(err.to_string().contains("pick one by id"));

        let err = resolve_plant(&garden, "Nobody").unwrap_err();
        assert!(err.to_string().contains("no plant found"));
    }
}

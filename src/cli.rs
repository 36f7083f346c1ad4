//! Where the initial animation comes from: `--animation` on native, `?id=` on the web.
use crate::animation::CATALOG;

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "hero-gallery", version, about = "A gallery of decorative canvas animations")]
pub struct Cli {
    /// Catalog id of the animation to open first
    #[arg(long, value_name = "ID")]
    pub animation: Option<String>,

    /// Print the catalog and exit
    #[arg(long)]
    pub list: bool,
}

/// Reads `id` from a location search string such as `?id=warp&x=1`
pub fn id_from_query(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty())
}

/// One line per catalog entry: id, name and tags
pub fn catalog_listing() -> String {
    let width = CATALOG.iter().map(|d| d.id.len()).max().unwrap_or(0);
    CATALOG
        .iter()
        .map(|descriptor| {
            format!(
                "{:width$}  {} [{}]\n",
                descriptor.id,
                descriptor.name,
                descriptor.tags.join(", ")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_query() {
        assert_eq!(id_from_query("?id=warp"), Some("warp".to_owned()));
        assert_eq!(id_from_query("?theme=dark&id=tunnel"), Some("tunnel".to_owned()));
        assert_eq!(id_from_query("?id="), None);
        assert_eq!(id_from_query(""), None);
    }

    #[test]
    fn test_listing_has_every_entry() {
        let listing = catalog_listing();
        assert_eq!(listing.lines().count(), CATALOG.len());
        assert!(listing.starts_with("particles"));
    }
}

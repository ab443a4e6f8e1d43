//! CLI command implementations.

pub(crate) mod links;
pub(crate) mod render;

pub(crate) use links::LinksArgs;
pub(crate) use render::RenderArgs;

use edgering_config::Config;
use edgering_renderer::KnownLinks;

/// Built-in known links with the config `[links]` table merged on top.
///
/// An empty class removes the platform.
pub(crate) fn effective_links(config: &Config) -> KnownLinks {
    let mut links = KnownLinks::new();
    for (platform, class) in &config.links {
        if class.is_empty() {
            links.remove(platform);
        } else {
            links.add(platform, class.as_str());
        }
    }
    links
}

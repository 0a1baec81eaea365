use serde::{Deserialize, Serialize};
use topos::util::PackConfig;

use crate::io::svg_export::SvgDrawOptions;

/// Configuration of a packing run from the command line
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct ToposConfig {
    /// Configuration of the orbiter, the NFP cache and the placement engine
    #[serde(default)]
    pub pack: PackConfig,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

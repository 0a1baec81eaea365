use serde::{Deserialize, Serialize};

use crate::config::ToposConfig;
use crate::io::ext_repr::{ExtInstance, ExtSolution};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ToposOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: ToposConfig,
}

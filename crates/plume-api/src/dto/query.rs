use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopValidatorsQuery {
    /// Number of validators to return. Defaults to the configured selector size.
    pub limit: Option<usize>,
}

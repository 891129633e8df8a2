use std::sync::Arc;

use crate::config::AppConfig;
use crate::images::ImageHost;
use crate::store::PropertyStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PropertyStore>,
    pub images: Arc<dyn ImageHost>,
    pub config: AppConfig,
}

use crate::series::Series;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub series: Arc<Series>,
}

impl AppState {
    pub fn new(series: Series) -> Self {
        Self {
            series: Arc::new(series),
        }
    }
}

use std::sync::Arc;

use crate::store::TimeSeriesStore;
use crate::targets::Target;

// App state
pub struct AppState {
    pub targets: Arc<Vec<Target>>,
    pub store: Arc<TimeSeriesStore>,
    pub sparkline_points: usize,
}

/// Curve processing on a loaded [`DataSet`](crate::data::model::DataSet):
/// two-point linear background removal and trapezoidal integration.

pub mod background;
pub mod integrate;

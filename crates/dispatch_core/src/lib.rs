pub mod clock;
pub mod config;
pub mod dispatch;
pub mod map_view;
pub mod navigation;
pub mod orders;
pub mod pricing;
pub mod scoring;
pub mod spatial;
pub mod telemetry;
pub mod traffic;
pub mod zones;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

mod store;

pub use store::ThresholdStore;

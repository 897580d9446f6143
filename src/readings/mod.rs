mod store;

pub use store::ReadingStore;

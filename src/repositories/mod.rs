pub mod plan_repository;

pub use plan_repository::{is_fresh, PlanRecordStore, PlanRepository};

//! Registries: CRUD services for rooms, clients, catalog services and staff

pub mod clients;
pub mod employees;
pub mod rooms;
pub mod services;

pub use clients::{ClientDraft, ClientPage, ClientRegistry};
pub use employees::{EmployeeDraft, EmployeeRegistry};
pub use rooms::{RoomCounts, RoomDraft, RoomRegistry};
pub use services::{ServiceCatalog, ServiceDraft};

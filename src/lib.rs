pub mod app;
pub mod error;
pub mod generators;
pub mod histogram;
pub mod maze;
pub mod session;
pub mod solvers;

#[allow(non_snake_case)]
pub mod Alloys;
#[allow(non_snake_case)]
pub mod Data;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod library_manager;

#![allow(dead_code)]

pub mod fake_efi_server;
pub mod fixtures;
pub mod in_memory_store;
pub mod redis_container;
pub mod scripted_gateway;

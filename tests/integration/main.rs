//! HTTP-level integration tests, driven through the router in-process on
//! the memory store.

mod helpers;

mod account_test;
mod content_test;
mod conversation_test;
mod folder_test;
mod health_test;

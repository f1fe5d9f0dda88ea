//! coursewiki: the wiki module of a course platform as a standalone service.
//!
//! Administrators curate short HTML/markdown entries; enrolled users see the
//! published subset. The interesting parts are the read-through listing cache
//! with delete-on-write invalidation, the rights filter, and the item REST
//! surface consumed by the external object editor.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;

//! HTTP plumbing for the adoption service.

pub(crate) mod client;
pub(crate) mod endpoints;

pub(crate) use client::ServiceClient;

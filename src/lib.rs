//! The `visiongate` crate is a request-signing gateway for a cloud
//! vision-generation API. It accepts a simplified client request (a text
//! prompt, an aspect ratio, a task identifier, optional credentials), computes
//! a SigV4-style request signature, forwards the signed request upstream, and
//! translates the upstream response back to the caller.
//!
//! # Workflow
//! 1. Build a [`GatewayConfig`] (usually via [`GatewayConfig::from_env`], which
//!    resolves fallback credentials exactly once at startup).
//! 2. Construct a [`Gateway`] over a [`Transport`]; the bundled
//!    [`HttpTransport`] performs real HTTP calls under a bounded deadline, and
//!    test doubles stub the trait.
//! 3. Call [`Gateway::invoke`] (or the action helpers) per request. Each
//!    invocation independently resolves credentials, signs via [`Signer`], and
//!    makes exactly one upstream call.
//!
//! The signer is a pure function of its inputs plus wall-clock time; the
//! signature covers exactly the bytes transmitted, so any post-signing
//! mutation of the query, headers, or body invalidates it. The terminator
//! literal, secret-key prefix, service, and region are [`SigningScheme`]
//! fields pinned per deployment rather than hard-coded literals.

mod canonical;
mod config;
mod constants;
mod credentials;
mod crypto;
mod error;
mod gateway;
mod server;
mod signer;
mod signing_key;
mod transport;

pub use crate::{
    canonical::SignedRequestSpec,
    config::{GatewayConfig, GatewayConfigBuilder},
    credentials::{CredentialOverrides, Credentials},
    error::GatewayError,
    gateway::Gateway,
    server::{router, serve},
    signer::{verify_signature, SignedHeaders, Signer, SigningScheme},
    signing_key::{DateKey, RegionKey, SecretKey, ServiceKey, SigningKey},
    transport::{HttpTransport, Transport, UpstreamRequest, UpstreamResponse},
};

//! Tiny client for the Google Identity Toolkit (Gitkit) relying-party API.
//!
//! This library provides essential tools for integrating the hosted Gitkit
//! sign-in widget into a web server: picking the identity token out of a
//! request, decoding it, enumerating the accounts held by the remote identity
//! service, and registering pre-hashed accounts in bulk.
//! [google document](https://developers.google.com/identity/toolkit/)
//! # Feature
//! - Read the relying-party configuration from the standard JSON server-config document
//! - Decode the identity token stored by the hosted widget and check its audience
//! - Download the remote account listing page by page (using reqwest)
//! - Upload a batch of accounts with precomputed password hashes (using reqwest)
//! - Render the demo pages by substituting placeholders in static templates
//! - Serve the demo pages with axum (`server` module and the `tiny_gitkit` binary)
//! # Caution
//! - This library is designed for direct communication with Google over HTTPS.
//! - It does **not** validate the identity token's signature when decoding it.
//!   As a result, the decoded token should not be passed to other components
//!   of your application as proof of identity.
pub mod account;
pub mod config;
pub mod download;
pub mod error;
pub mod executer;
pub mod server;
pub mod template;
pub mod token;
pub mod upload;

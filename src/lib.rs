// SPDX-License-Identifier: MIT

//! Motorlot: car dealership e-commerce backend
//!
//! This crate provides the HTTP API for accounts (signup, email
//! verification, login), the car catalog, checkout, address management,
//! and the realtime buyer↔admin chat.

pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod routes;
pub mod services;

use chat::RoomRegistry;
use config::Config;
use db::FirestoreDb;
use services::{CaptchaClient, MailerClient, MediaClient, PaymentClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub captcha: CaptchaClient,
    pub mailer: MailerClient,
    pub media: MediaClient,
    pub payment: PaymentClient,
    pub rooms: RoomRegistry,
}

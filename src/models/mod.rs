// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod car;
pub mod order;
pub mod user;

pub use car::{Car, PublicCar};
pub use order::{Order, PaymentMethod};
pub use user::{Address, PublicUser, Role, User, UserPatch};

// SPDX-License-Identifier: MIT

//! External service clients (captcha, mail, image storage, payment).

pub mod captcha;
pub mod mailer;
pub mod media;
pub mod payment;

pub use captcha::CaptchaClient;
pub use mailer::MailerClient;
pub use media::MediaClient;
pub use payment::{CreatedPayment, PaymentClient, PaymentLink};

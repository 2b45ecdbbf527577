mod common;

mod auth;
mod messages;
mod pages;
mod settings;
mod testimonials;
mod uploads;

mod admin_change;
mod config;

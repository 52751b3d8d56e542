mod client;
mod nullable;

pub use client::{Client, ClientChange, ClientPatch, NewClient, limits};
pub use nullable::Nullable;

mod harness;
mod owner;
mod security;

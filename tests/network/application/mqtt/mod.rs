mod broker;
mod client;

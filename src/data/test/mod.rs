mod settings;
mod ticket;
mod transcript;


mod hooks;

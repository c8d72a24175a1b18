mod batch;
mod common;
mod intake;

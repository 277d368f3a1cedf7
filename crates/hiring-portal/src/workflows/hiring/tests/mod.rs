mod common;

mod dashboard;
mod gate;

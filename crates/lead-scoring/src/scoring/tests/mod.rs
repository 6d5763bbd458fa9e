mod common;
mod features;
mod result;
mod rules;

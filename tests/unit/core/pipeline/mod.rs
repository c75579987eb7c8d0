pub mod hazards;

pub mod problem_bank;

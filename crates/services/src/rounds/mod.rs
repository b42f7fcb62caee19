mod generator;

pub use generator::ProblemGenerator;

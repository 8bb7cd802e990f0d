pub mod denominator;

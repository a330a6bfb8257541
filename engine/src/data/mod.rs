// Input side of the engine: price history handed over by the fetch collaborator.
pub mod csv_parser;
pub mod market_data;
pub mod validation;

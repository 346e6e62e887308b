pub mod lining_builder;

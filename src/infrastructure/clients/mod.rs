pub mod bgg;
pub mod bgg_xml;

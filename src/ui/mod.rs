/// UI layer: panel widgets, the paginated table, and chart rendering.
pub mod panels;
pub mod plot;
pub mod table;

pub mod shops;

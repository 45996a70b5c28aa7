mod index;
mod store;

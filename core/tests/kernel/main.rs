mod cycle;
mod persistence;

mod generation;
mod scoring;

mod drives;
mod flow;

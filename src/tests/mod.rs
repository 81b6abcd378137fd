mod activation;
mod alpha;
mod history;

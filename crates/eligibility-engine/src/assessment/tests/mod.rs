mod common;
mod matching;
mod routing;

mod cache;
mod corporation;
mod failure;
mod ledger;
mod pool;
mod scope;
mod token;

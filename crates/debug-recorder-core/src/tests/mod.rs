mod state;
mod storage;

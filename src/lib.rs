pub mod net;
pub mod routing;
pub mod sim;
pub mod topo;

#[cfg(test)]
mod test;

mod topologies;

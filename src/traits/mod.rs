mod std_ops;

use shared_kernel::integer_key;

integer_key!(SubscriptionId);

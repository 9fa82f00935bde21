mod client_info;

mod sanskrit;
